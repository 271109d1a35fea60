pub mod a001_orders;

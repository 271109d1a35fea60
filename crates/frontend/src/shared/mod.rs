pub mod api_utils;
pub mod clock;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod storage;

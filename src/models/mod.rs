pub mod answer;
pub mod interval;
pub mod response;

pub mod animation;
pub mod city;
pub mod clock;
pub mod config;
pub mod controller;
pub mod icons;
pub mod offset;
pub mod peek_ui;
pub mod relative;
pub mod time_of_day;

pub mod check;
pub mod date;
pub mod doctor;

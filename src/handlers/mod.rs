pub mod canteens;
pub mod menus;

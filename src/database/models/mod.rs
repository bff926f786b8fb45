pub mod canteen;
pub mod menu;

pub use canteen::{Canteen, CanteenChanges, CanteenWithMenus};
pub use menu::{Menu, MenuChanges};

//! HTTP handlers

pub mod catalog;
pub mod health;
pub mod menu_items;
pub mod menus;

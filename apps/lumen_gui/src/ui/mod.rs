//! UI 模块

pub mod deck;
pub mod theme;

pub use deck::TransportDeck;
pub use theme::LumenTheme;

// Arena duel: combat and physics simulation for a two-fighter arena brawler

pub mod core;
pub mod engine;
pub mod game;

//! Нечеткий регулятор адаптивного круиз-контроля
//!
//! Движок нечеткого вывода Мамдани: входные лингвистические термы,
//! база правил и дефаззификация выходного нечеткого множества
//! ускорения. Тестовый заезд в `simulation` прогоняет регулятор
//! по простой кинематической модели.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod data;
pub mod simulation;
pub mod utils;

pub use control::acc::AccController;
pub use control::engine::{DefuzzificationMethod, EngineConfig, FuzzyEngine};
pub use control::error::FuzzyError;
pub use control::membership::{ContinuousMembershipFunction, MembershipShape};
pub use control::rules::RuleBase;
pub use control::sampled::SampledMembershipFunction;

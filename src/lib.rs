//! 핵심 분석 로직을 라이브러리로 분리하여 CLI 뿐 아니라 추후 GUI 확장도 쉽게 한다.

pub mod app;
pub mod cavitation;
pub mod config;
pub mod csv_import;
pub mod envelope;
pub mod i18n;
pub mod ui_cli;

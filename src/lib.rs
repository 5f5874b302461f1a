//! Club Billing - Membership-fee billing cycle and push reminders
//!
//! A scheduled trigger walks members through the monthly fee cycle
//! (`paid -> warning -> overdue`) and notifies them on every device they
//! registered for Web Push.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Homework Core
//!
//! Core types and pure logic for the homework status bot.
//!
//! This crate contains:
//! - Domain types: submissions, poll responses and the poll cursor
//! - Status catalog: raw review status codes mapped to verdict sentences
//! - Validation: shape checks over a decoded poll response
//! - Change detection: deciding whether a status change is worth a message
//! - DTOs: wire types for the messaging API
//!
//! Nothing in here performs I/O.

pub mod catalog;
pub mod detector;
pub mod domain;
pub mod dto;
pub mod error;
pub mod message;
pub mod validation;

//! Game state: characters, save slots, sessions
//!
//! This module owns everything the save/load screen consumes:
//! - `character`: characters, slots and their metadata
//! - `manager`: the `StateManager` that scans the saves root, tracks the
//!   running session, and executes save/load requests
//!
//! Slot files are self-contained JSON documents (metadata plus a base64
//! JPEG screenshot), one per save, grouped per character directory.

pub mod character;
pub mod manager;

pub use character::{Character, GameTime, Signature, Slot, SlotProfile};
pub use manager::{Session, SessionState, StateError, StateManager};

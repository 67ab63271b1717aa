//! Core of the Rose Day card: procedural rose geometry, the falling petal
//! overlay and the regenerating message card.
//!
//! Main components:
//! - [`bloom`] — golden-angle petal descriptors.
//! - [`particle`] — randomized falling petals and their keyframes.
//! - [`scene`] — the rose assembly, its motion and world-space triangles.
//! - [`mesh`] — tessellation of the primitive shapes.
//! - [`lighting`] — light rig, shading and fog.
//! - [`camera`] — orbit camera and projection.
//! - [`stars`] — background star shell.
//! - [`message`] / [`panel`] — the card text and its Idle/Generating state machine.
//! - [`generator`] — text-generation capability and the Gemini client.
//! - [`config`] — design-time constants and environment overrides.
//! - [`error`] — error types.
//! - [`types`] — shared ids and colours.

pub mod bloom;
pub mod camera;
pub mod config;
pub mod error;
pub mod generator;
pub mod lighting;
pub mod mesh;
pub mod message;
pub mod panel;
pub mod particle;
pub mod scene;
pub mod stars;
pub mod types;

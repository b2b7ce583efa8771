//! Domain Layer
//!
//! Pure compile-on-save logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - `CompileRequest`
//! - `value_objects/` - include filter, output path resolution
//! - `ports/` - compiler and event interfaces for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Pure Functions** - Filter and resolver are deterministic
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;

// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits for the core concepts of the
// preparation pipeline.
//
// Rules for this layer:
//   - NO file I/O
//   - NO logging
//   - Only plain Rust structs, enums, and traits
//
// Think of this layer as the "dictionary" of the system:
// it defines what things ARE, not how they are produced.
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// Token <-> id mapping plus the reserved symbols
pub mod vocabulary;

// Dialogue rows, column layouts, turns and exchanges
pub mod dialogue;

// Core abstractions (traits) that other layers implement
pub mod traits;

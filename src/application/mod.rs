// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data layer to produce a full training set.
//
// Rules for this layer:
//   - No tokenizing or counting here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The full preparation workflow
pub mod prepare_use_case;

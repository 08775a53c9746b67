//! World-level collision scenarios

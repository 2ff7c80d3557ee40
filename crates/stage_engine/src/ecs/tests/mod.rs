//! Cross-module tests driving full frames through scenes and the manager

mod scene_flow;

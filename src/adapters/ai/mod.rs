//! AI adapter module. Implements AiPort for the clinical assistant.
//!
//! Provides the Gemini adapter and a mock adapter for offline runs and tests.

pub mod gemini_adapter;
pub mod mock_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockAiAdapter;

//! Scene script generation.
//!
//! [`ScriptGenerator`] asks a text model for three scene descriptions and
//! guarantees a valid triple: a reply that is not clean JSON gets one
//! reformat request, and any remaining failure falls back to templates
//! built from the character preset and keywords in the story prompt.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod fallback;
mod generator;
mod postprocess;
mod prompts;

pub use extraction::{extract_json_array, parse_scene_array};
pub use fallback::{fallback_scripts, select_environment};
pub use generator::{ScriptDraft, ScriptGenerator, ScriptSource};
pub use postprocess::enhance_scene;
pub use prompts::{extraction_prompt, system_instruction, user_prompt};

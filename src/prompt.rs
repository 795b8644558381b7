//! Instruction prompt assembly for composite requests.
//!
//! The downstream model is steered entirely by this text: a fixed preamble
//! describing the compositing task, an optional user-supplied section, and a
//! fixed block of hard requirements on the output image.

/// Fixed role and primary-instruction preamble.
const PRIMARY_INSTRUCTIONS: &str = "\
You are a professional event photo compositor. Your task is to seamlessly merge the guest's photo into the base couple's photo, making it look like a real, on-stage portrait.

PRIMARY INSTRUCTIONS:
Seamlessly blend the guest into the main photo. Place them where they fit most naturally and match the lighting and style of the original photo.";

/// Fixed constraints on the generated output.
const HARD_REQUIREMENTS: &str = "\
HARD REQUIREMENTS:
- Keep the couple EXACTLY as in the base image: same pose, outfits, expressions, framing, and their original background unless explicitly told to change it in the prompt.
- Place the guest naturally into the scene.
- Match lighting, color temperature, shadows, and grain from the base image to the guest.
- Preserve hair edges and fine details; avoid halos or cutout artifacts.
- Maintain realistic scale and perspective; align shoulders and eyelines naturally.
- Ensure hands and fingers look natural; avoid creating extra or duplicate limbs.
- Apply subtle retouching only if necessary or requested in the primary instructions.

OUTPUT:
- One photorealistic merged image suitable for print.
- Maintain the original aspect ratio. Never crop out the couple.";

/// Assembles the full instruction prompt from the user's optional notes.
///
/// Notes are trimmed; when non-empty they appear as an
/// `ADDITIONAL INSTRUCTIONS:` section between the fixed blocks, otherwise the
/// section is omitted entirely. Pure and deterministic.
pub fn compose(user_notes: &str) -> String {
    let notes = user_notes.trim();

    let additional = if notes.is_empty() {
        String::new()
    } else {
        format!("\n\nADDITIONAL INSTRUCTIONS:\n{notes}")
    };

    format!("{PRIMARY_INSTRUCTIONS}{additional}\n\n{HARD_REQUIREMENTS}")
}

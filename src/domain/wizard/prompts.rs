//! Reply texts.
//!
//! Everything the wizard says is Markdown meant to be rendered as-is by the
//! host; nothing here is parsed back.

use super::catalog::{self, Variant};
use super::integration::IntegrationConfig;
use super::platform::{Platform, PlatformToken};
use super::step::WizardStep;

/// Help shown when free text arrives and no flow is running.
pub fn overview() -> String {
    format!(
        "## Debug Unlock Integration Wizard\n\n\
         I collect three pieces of information about your project and then generate \
         the adapter code that lets the debug-unlock core read its magic flag:\n\n\
         1. the **memory allocation** function that maps the shared debug-flag region\n\
         2. the **dataset loading** function that reads persisted calibration data\n\
         3. an optional **alternative debug-level source**\n\n\
         **Commands**\n\n\
         - `begin-integration <{}>`: start the wizard\n\
         - `inspect-workspace`: list integration files that already exist\n\
         - `wrap-function <name>`: get a wrapper questionnaire for one function\n",
        PlatformToken::ACCEPTED.join("|")
    )
}

/// Re-prompt for a missing or unknown platform token.
pub fn invalid_platform(token: &str) -> String {
    let accepted = PlatformToken::ACCEPTED
        .iter()
        .map(|t| format!("`{}`", t))
        .collect::<Vec<_>>()
        .join(", ");

    let problem = if token.trim().is_empty() {
        "⚠️ Missing platform.".to_string()
    } else {
        format!("⚠️ Unknown platform `{}`.", token.trim())
    };

    format!(
        "{} Use one of: {}.\n\nExample: `begin-integration posix`\n",
        problem, accepted
    )
}

/// Notice that generated files would supersede existing ones.
pub fn existing_files_notice(existing: &[String]) -> String {
    if existing.is_empty() {
        return String::new();
    }
    let mut out = String::from("> **Existing integration files found.** They will be superseded by the generated ones:\n");
    for path in existing {
        out.push_str(&format!("> - `{}`\n", path));
    }
    out.push('\n');
    out
}

/// Header for a direct-mode start.
pub fn started_direct(platform: Platform, detected: Option<Platform>, path: &str) -> String {
    let mut out = format!(
        "Starting **{}** integration. Files will be placed under `{}`.\n\n",
        platform, path
    );
    if let Some(detected) = detected.filter(|d| *d != platform) {
        out.push_str(&format!(
            "> Note: the workspace looks like a **{}** project, but you chose **{}**.\n\n",
            detected, platform
        ));
    }
    out
}

/// Variant selection menu, marking the detected variant.
pub fn variant_menu(detected: Option<Variant>) -> String {
    let mut out = String::from("### Select the deployment variant\n\n");
    for variant in Variant::all() {
        let marker = if Some(*variant) == detected {
            " _(detected)_"
        } else {
            ""
        };
        out.push_str(&format!(
            "{}. **{}**{}: {} (`{}`)\n",
            variant.menu_index(),
            variant.display_name(),
            marker,
            variant.description(),
            catalog::resolve(*variant)
        ));
    }
    out.push_str("\nReply with the number or the name of the variant.\n");
    out
}

/// Re-prompt after an unmatched variant reply.
pub fn invalid_selection(input: &str, detected: Option<Variant>) -> String {
    format!(
        "⚠️ Invalid selection `{}`. Reply with a number from 1 to {} or a variant name.\n\n{}",
        input,
        Variant::all().len(),
        variant_menu(detected)
    )
}

/// Confirmation of a variant choice.
pub fn variant_selected(variant: Variant, path: &str) -> String {
    let mut out = format!(
        "✅ Variant: **{}**\n\nIntegration files will be placed under `{}`.\n\n",
        variant.display_name(),
        path
    );
    if variant.is_generic() {
        out.push_str(
            "> The path is a placeholder: replace `<board>` and `<stack>` with your \
             project's names.\n\n",
        );
    }
    out
}

fn candidate_block(candidates: &[String]) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    let mut out = String::from("Candidates found in your workspace:\n");
    for name in candidates {
        out.push_str(&format!("- `{}`\n", name));
    }
    out.push('\n');
    out
}

/// Step 1/3 question.
pub fn memory_prompt(candidates: &[String]) -> String {
    format!(
        "### Step 1/3: Memory allocation function\n\n\
         Which function maps or allocates the shared memory region that holds the debug flag? \
         (for example `ShmM_MapOwner`)\n\n{}",
        candidate_block(candidates)
    )
}

/// Step 2/3 question.
pub fn dataset_prompt(candidates: &[String]) -> String {
    format!(
        "### Step 2/3: Dataset loading function\n\n\
         Which function loads the persisted dataset that stores the configured debug level?\n\n{}",
        candidate_block(candidates)
    )
}

/// Step 3/3 question.
pub fn alt_prompt() -> String {
    "### Step 3/3: Alternative debug-level source\n\n\
     Is there another function that can provide the debug level (for example an NVM or \
     diagnostic-service getter)? Reply with its name, or `none`.\n"
        .to_string()
}

/// Echo of a captured function name.
pub fn captured(label: &str, name: &str) -> String {
    if name.is_empty() {
        format!("✅ {}: _(empty)_\n\n", label)
    } else {
        format!("✅ {}: `{}`\n\n", label, name)
    }
}

/// Re-prompt after an empty capture.
pub fn empty_capture(step: WizardStep) -> String {
    format!(
        "⚠️ A function name is required for {}.\n\n",
        step.progress_label().unwrap_or("this step")
    )
}

/// Notice that `begin-integration` arrived mid-flow.
pub fn already_running(step: WizardStep) -> String {
    let at = step.progress_label().unwrap_or("variant selection");
    format!(
        "An integration is already in progress ({}). Answer the current question to continue.\n\n",
        at
    )
}

/// Final message before generation starts.
pub fn configuration_complete(config: &IntegrationConfig) -> String {
    format!(
        "## Configuration complete\n\n{}\nGenerating integration files...\n\n",
        config.summary_markdown()
    )
}

/// Warning plus fallback summary when no generator could be reached.
pub fn generation_unavailable(reason: &str, config: &IntegrationConfig) -> String {
    format!(
        "⚠️ **No code generation model is available** ({}).\n\n\
         Here is the configuration I collected; you can re-run `begin-integration` once a \
         model is configured, or write the adapters by hand:\n\n{}",
        reason,
        config.summary_markdown()
    )
}

/// Warning plus fallback summary when the generator rejected the request.
pub fn generation_failed(reason: &str, config: &IntegrationConfig) -> String {
    format!(
        "⚠️ **Code generation failed**: {}\n\n{}",
        reason,
        config.summary_markdown()
    )
}

/// Warning appended when the stream broke off.
pub fn generation_interrupted(reason: &str) -> String {
    format!(
        "\n\n⚠️ **Generation was interrupted**: {}. The output above is incomplete.\n",
        reason
    )
}

/// Note appended when the generator hit its output limit.
pub fn generation_truncated() -> String {
    "\n\n⚠️ The generated output reached the length limit and may be truncated.\n".to_string()
}

/// Usage hint for `wrap-function` without a name.
pub fn wrap_function_usage() -> String {
    "Usage: `wrap-function <name>`\n\nExample: `wrap-function ShmM_MapOwner`\n".to_string()
}

/// Questionnaire about an existing function's return type.
pub fn wrap_function_questions(name: &str) -> String {
    format!(
        "### Wrapping `{name}`\n\n\
         To generate an adapter for `{name}` I need to know what it returns:\n\n\
         1. a **pointer** to the mapped region (`NULL` on failure)\n\
         2. a **status code** (`Std_ReturnType`, `int` with `0` on success)\n\
         3. **void** with the result passed through an out-parameter\n\n\
         Reply with the number, then run `begin-integration` and enter `{name}` at the matching step.\n"
    )
}

/// Report for `inspect-workspace`.
pub fn inspect_report(
    existing: &[String],
    platform: Option<Platform>,
    variant: Option<Variant>,
) -> String {
    let mut out = String::from("## Workspace inspection\n\n");

    if existing.is_empty() {
        out.push_str(
            "No existing integration files were found.\n\n\
             Run `begin-integration <posix|autosar|variant-aware>` to create them.\n",
        );
    } else {
        out.push_str(&format!("Found {} integration file(s):\n\n", existing.len()));
        for path in existing {
            out.push_str(&format!("- `{}`\n", path));
        }
    }

    if platform.is_some() || variant.is_some() {
        out.push_str("\n**Detected**\n\n");
        if let Some(platform) = platform {
            out.push_str(&format!("- Platform: {}\n", platform));
        }
        if let Some(variant) = variant {
            out.push_str(&format!("- Variant: {}\n", variant));
        }
    }

    out
}

//! Prompt construction for the classifier and generated-answer modes.
//!
//! The classification prompt names every allowed category label verbatim so
//! the answer can be mapped back with [`Category::from_label`].

use crate::catalog::Category;

/// Build the single-turn classification prompt.
///
/// * `offered`: categories the model should choose from (catch-all excluded).
/// * `catch_all`: label the model is told to use for off-topic messages.
///
/// ```
/// use line_reply_bot::catalog::Category;
/// use line_reply_bot::classifier::prompt::classification_prompt;
///
/// let prompt = classification_prompt(
///     "ขอใบกำกับภาษีได้ไหม",
///     &[Category::Payment, Category::Price],
///     Category::Unrelated,
/// );
/// assert!(prompt.contains("[Payment, Price]"));
/// assert!(prompt.ends_with("Category:"));
/// ```
pub fn classification_prompt(text: &str, offered: &[Category], catch_all: Category) -> String {
    let labels = offered
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Classify the following user query into one of these categories: [{labels}]. \
Respond with only the single category name. \
For example, if the query is \"how much does it cost?\", respond with \"{price}\". \
If the query includes Thai verbs like \"จ่าย\" (pay), \"โอน\" (transfer), \"ซ่อม\" (repair), \"ทำ\" (do), or similar, \
or English terms like \"payment\", \"pay\", \"transfer\", \"cash\", \"invoice\", choose the appropriate category \
(e.g., \"{payment}\" for \"จ่าย\"). \
If the query is not related to the business, respond with \"{catch_all}\".\n\
\n\
User Query: \"{query}\"\n\
Category:",
        price = Category::Price.label(),
        payment = Category::Payment.label(),
        catch_all = catch_all.label(),
        query = text.trim(),
    )
}

/// Build the free-form answer prompt for generated-answer mode.
pub fn answer_prompt(persona: &str, text: &str) -> String {
    format!("{}\n\nUser: {}\nAssistant:", persona.trim(), text.trim())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn offered() -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| *c != Category::Unrelated)
            .collect()
    }

    #[test]
    fn lists_every_offered_label_in_order() {
        let prompt = classification_prompt("hi", &offered(), Category::Unrelated);
        assert!(prompt.contains(
            "[Owner, Car_Repair, Location, Ordering, General_Help, Payment, Price]"
        ));
    }

    #[test]
    fn catch_all_is_not_offered_but_is_named_for_off_topic() {
        let prompt = classification_prompt("hi", &offered(), Category::Unrelated);
        let list_end = prompt.find(']').expect("label list");
        assert!(!prompt[..list_end].contains("Unrelated"));
        assert!(prompt.contains("respond with \"Unrelated\""));
    }

    #[test]
    fn asks_for_a_single_label() {
        let prompt = classification_prompt("hi", &offered(), Category::Unrelated);
        assert!(prompt.contains("Respond with only the single category name."));
    }

    #[test]
    fn embeds_trimmed_user_text_and_cue() {
        let prompt = classification_prompt("  ส่งของได้ไหม \n", &offered(), Category::Unrelated);
        assert!(prompt.contains("User Query: \"ส่งของได้ไหม\"\nCategory:"));
        assert!(prompt.ends_with("Category:"));
    }

    #[test]
    fn answer_prompt_layout() {
        let prompt = answer_prompt("You are a shop assistant.\n", " hello ");
        assert_eq!(prompt, "You are a shop assistant.\n\nUser: hello\nAssistant:");
    }
}

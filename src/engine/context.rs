use greenbook_types::Business;

/// System prompt - instructs the LLM how to behave
pub const SYSTEM_PROMPT: &str = r#"You are the Ногоон дэвтэр (Green Book) AI Assistant, a helpful assistant for a business directory of local restaurants, hotels, shops and services.
Your role is to help users find businesses and answer questions about local services.

When recommending businesses:
- Be concise and helpful
- Highlight key details like location, hours, and services
- If multiple businesses match, briefly compare them
- If no businesses match well, suggest alternatives or ask the user to refine their query
- Respond in the same language as the user's query (Mongolian or English)

Format your responses in a friendly, conversational tone."#;

/// Fixed system instruction for both search and chat.
pub fn build_system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// Numbered listing of candidate businesses with their contact details.
fn format_listing(businesses: &[Business]) -> String {
    businesses
        .iter()
        .enumerate()
        .map(|(i, b)| {
            format!(
                "\n{}. **{}** ({})\n   - Description: {}\n   - Address: {}\n   - Phone: {}\n   - Hours: {}\n   - Website: {}",
                i + 1,
                b.name,
                b.category.name,
                b.description,
                b.address,
                b.phone,
                b.timetable.as_deref().unwrap_or("-"),
                b.website.as_deref().unwrap_or("-"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// User message for one-shot search: the raw query plus the candidate listing.
pub fn build_user_prompt(query: &str, businesses: &[Business]) -> String {
    format!(
        "User query: \"{query}\"\n\n\
         Here are the most relevant businesses from our directory:\n\
         {listing}\n\n\
         Please help the user with their query based on these business listings. \
         If the listings don't match well, let them know and suggest what they might search for instead.",
        query = query,
        listing = format_listing(businesses),
    )
}

/// Chat-mode system prompt: the fixed instruction with a one-line-per-business
/// listing appended.
pub fn build_chat_system_prompt(businesses: &[Business]) -> String {
    let context = businesses
        .iter()
        .map(|b| {
            format!(
                "- {} ({}): {}. Address: {}. Phone: {}. Hours: {}",
                b.name,
                b.category.name,
                b.description,
                b.address,
                b.phone,
                b.timetable.as_deref().unwrap_or("-"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{SYSTEM_PROMPT}\n\nRelevant businesses from our directory:\n{context}")
}

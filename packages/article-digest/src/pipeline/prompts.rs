//! System instructions for the two enrichment calls.

/// Summary instruction: headline, up to five bullets, one-line conclusion.
pub const SUMMARY_PROMPT: &str = "You are a concise summarizer. Do NOT return a wall of text. Follow this strict format:

1. 🎯 **TL;DR**: One clear sentence.
2. 🔑 **Key Points**: Use a bulleted list (max 5 points). Use simple bullets like '•' or '➤'.
3. 💡 **Conclusion**: A brief wrap-up sentence.

Keep the total length under 200 words.";

/// Topic instruction: exactly two comma-separated labels.
pub const TOPIC_PROMPT: &str = "Classify this content into exactly 2 topics (e.g. Tech, Finance, AI, Education). Return ONLY 'Topic1, Topic2'.";

// UI Constants
pub const USER_PREFIX: &str = "You: ";
pub const BOT_PREFIX: &str = "AI: ";
pub const THINKING_MESSAGE: &str = "AI is thinking...";
pub const REQUEST_FAILED_MESSAGE: &str = "Error: Failed to get response.";

// API Constants
pub const CHAT_PATH: &str = "/chat";
pub const QUESTION_PARAM: &str = "user_question";

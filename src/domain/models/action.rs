use super::Message;

pub enum Action {
    AuthorizeWorkspace(String),
    ChatRequest(Message, String),
    VerifySession(String),
}

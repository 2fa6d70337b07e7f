mod attendance;
mod chat_room;
mod invitation;
mod manual;
mod meeting;
mod message;
mod organization;
mod task;
mod user;

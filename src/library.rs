pub mod logger {
    pub mod impl_console;
    pub mod interface;
}
pub mod repeating_task;

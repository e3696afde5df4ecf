mod log_and_global_log;
mod find_commits_by_message;

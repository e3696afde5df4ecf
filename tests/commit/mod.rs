mod commit_staged_changes;
mod commit_refusals;

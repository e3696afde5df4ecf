mod merge_with_conflict;
mod merge_refusals;
mod merge_criss_cross;

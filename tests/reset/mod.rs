mod reset_to_commit;

mod checkout_files;
mod checkout_branches;

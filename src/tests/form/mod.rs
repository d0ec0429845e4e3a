mod binding_tests;
mod layout_tests;
mod state_tests;

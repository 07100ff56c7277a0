mod gateway_test;
mod session_test;
mod token_store_test;

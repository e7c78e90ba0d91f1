mod go_back_n;
mod stop_wait;

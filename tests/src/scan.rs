mod export;
mod integration;
mod loopback;

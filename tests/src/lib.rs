#![cfg(test)]

mod scanning;
mod stubs;

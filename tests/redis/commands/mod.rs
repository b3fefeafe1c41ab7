mod blpop;
mod llen;
mod lpush;
mod rpush;
mod set;
mod xadd;

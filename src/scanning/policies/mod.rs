mod poll_policy;

pub use poll_policy::PollPolicy;

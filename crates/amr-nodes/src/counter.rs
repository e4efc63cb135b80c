//! Aula7 counter: a publisher that counts ticks and a subscriber that prints them.

use std::time::Duration;

use custom_interfaces::msg::Aula7;
use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::params::NodeParameters;
use crate::pubsub::Publisher;

pub const TOPIC: &str = "aula7_topic";
pub const PUBLISHER_NODE: &str = "aula7_publisher";
pub const SUBSCRIBER_NODE: &str = "aula7_subscriber";
pub const MESSAGE_PREFIX: &str = "The count is: ";

/// `"<message><count>"`, the line both ends log.
pub fn render(msg: &Aula7) -> String {
    format!("{}{}", msg.message, msg.count)
}

pub struct CounterPublisher<P> {
    publisher: P,
    count: i32,
    period: Duration,
}

impl<P: Publisher<Aula7>> CounterPublisher<P> {
    /// Reads `period_ms` (default 1000).
    pub fn new(publisher: P, params: &NodeParameters) -> Result<Self> {
        Ok(Self {
            publisher,
            count: 0,
            period: params.declare_period_ms("period_ms", 1000)?,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Last count published, 0 before the first tick.
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Increment the counter and publish it.
    pub fn tick(&mut self) -> Result<Aula7> {
        self.count = self.count.wrapping_add(1);
        let msg = Aula7::builder()
            .count(self.count)
            .message(MESSAGE_PREFIX.to_string());
        self.publisher.publish(&msg)?;
        info!("Publishing: \"{}\"", render(&msg));
        Ok(msg)
    }

    /// Publish `ticks` times, one period apart.
    pub fn run(&mut self, ticks: usize, clock: &dyn Clock) -> Result<()> {
        for i in 0..ticks {
            if i > 0 {
                clock.sleep(self.period);
            }
            self.tick()?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CounterSubscriber {
    received: usize,
}

impl CounterSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_message(&mut self, msg: &Aula7) -> String {
        self.received += 1;
        let line = render(msg);
        info!("Receiving: \"{}\"", line);
        line
    }

    pub fn received(&self) -> usize {
        self.received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::pubsub::loopback;

    #[test]
    fn test_first_count_is_one() {
        let (publisher, subscriber) = loopback::<Aula7>(TOPIC);
        let mut node = CounterPublisher::new(publisher, &NodeParameters::new(PUBLISHER_NODE)).unwrap();
        assert_eq!(node.count(), 0);
        let msg = node.tick().unwrap();
        assert_eq!(msg.count, 1);
        assert_eq!(msg.message, MESSAGE_PREFIX);
        assert_eq!(subscriber.recv().unwrap(), msg);
    }

    #[test]
    fn test_run_sleeps_between_ticks() {
        let (publisher, subscriber) = loopback::<Aula7>(TOPIC);
        let params = NodeParameters::from_yaml(
            PUBLISHER_NODE,
            "/**:\n  ros__parameters:\n    period_ms: 250\n",
        )
        .unwrap();
        let mut node = CounterPublisher::new(publisher, &params).unwrap();
        let clock = SimulatedClock::new();
        node.run(4, &clock).unwrap();
        assert_eq!(clock.now(), Duration::from_millis(750));

        let mut listener = CounterSubscriber::new();
        let lines: Vec<_> = subscriber
            .drain()
            .unwrap()
            .iter()
            .map(|m| listener.on_message(m))
            .collect();
        assert_eq!(
            lines,
            [
                "The count is: 1",
                "The count is: 2",
                "The count is: 3",
                "The count is: 4"
            ]
        );
        assert_eq!(listener.received(), 4);
    }

    #[test]
    fn test_counter_wraps() {
        let (publisher, _subscriber) = loopback::<Aula7>(TOPIC);
        let mut node = CounterPublisher::new(publisher, &NodeParameters::new(PUBLISHER_NODE)).unwrap();
        node.count = i32::MAX;
        assert_eq!(node.tick().unwrap().count, i32::MIN);
    }
}

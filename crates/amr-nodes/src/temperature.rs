//! Temperature readings and the Celsius to Fahrenheit conversion service.

use std::time::Duration;

use custom_interfaces::msg::Temperature;
use custom_interfaces::srv::{
    CelsiusToFahrenheit, CelsiusToFahrenheitRequest, CelsiusToFahrenheitResponse,
};
use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::Result;
use crate::params::NodeParameters;
use crate::pubsub::Publisher;
use crate::service::ServiceHandler;

pub const TOPIC: &str = "temperature";
pub const SERVICE: &str = "celsiustofahrenheit_srv";
pub const PUBLISHER_NODE: &str = "temperature_publisher";
pub const SUBSCRIBER_NODE: &str = "temperature_subscriber";
pub const SERVER_NODE: &str = "celsiustofahrenheit_srv_server";

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Publishes a random reading in `[0, 100]` every period.
pub struct TemperaturePublisher<P, R = ThreadRng> {
    publisher: P,
    rng: R,
    period: Duration,
}

impl<P: Publisher<Temperature>> TemperaturePublisher<P> {
    /// Reads `period_ms` (default 1000).
    pub fn new(publisher: P, params: &NodeParameters) -> Result<Self> {
        Self::with_rng(publisher, params, rand::thread_rng())
    }
}

impl<P: Publisher<Temperature>, R: Rng> TemperaturePublisher<P, R> {
    pub fn with_rng(publisher: P, params: &NodeParameters, rng: R) -> Result<Self> {
        Ok(Self {
            publisher,
            rng,
            period: params.declare_period_ms("period_ms", 1000)?,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn tick(&mut self) -> Result<Temperature> {
        let msg = Temperature::builder().temperature(self.rng.gen_range(0..=100));
        self.publisher.publish(&msg)?;
        debug!("Published temperature {}", msg.temperature);
        Ok(msg)
    }

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
pub struct TemperatureSubscriber {
    last: Option<i32>,
}

impl TemperatureSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_message(&mut self, msg: &Temperature) {
        info!("Temperature: {}", msg.temperature);
        self.last = Some(msg.temperature);
    }

    /// Most recent reading.
    pub fn last(&self) -> Option<i32> {
        self.last
    }
}

#[derive(Debug, Default)]
pub struct ConversionServer;

impl ServiceHandler<CelsiusToFahrenheit> for ConversionServer {
    fn handle(&mut self, request: CelsiusToFahrenheitRequest) -> Result<CelsiusToFahrenheitResponse> {
        let fahrenheit = celsius_to_fahrenheit(request.celsius);
        debug!("{} C = {} F", request.celsius, fahrenheit);
        Ok(CelsiusToFahrenheitResponse { fahrenheit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::pubsub::loopback;
    use crate::service::call_service;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_readings_stay_in_range() {
        let (publisher, subscriber) = loopback::<Temperature>(TOPIC);
        let mut node = TemperaturePublisher::with_rng(
            publisher,
            &NodeParameters::new(PUBLISHER_NODE),
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        let clock = SimulatedClock::new();
        node.run(200, &clock).unwrap();
        assert_eq!(clock.now(), Duration::from_secs(199));

        let mut listener = TemperatureSubscriber::new();
        let readings = subscriber.drain().unwrap();
        assert_eq!(readings.len(), 200);
        for reading in &readings {
            assert!((0..=100).contains(&reading.temperature));
            listener.on_message(reading);
        }
        assert_eq!(listener.last(), readings.last().map(|r| r.temperature));
    }

    #[test]
    fn test_conversion() {
        let mut server = ConversionServer;
        for (celsius, fahrenheit) in [(0.0, 32.0), (100.0, 212.0), (-40.0, -40.0), (37.0, 98.6)] {
            let response = call_service::<CelsiusToFahrenheit, _>(
                SERVICE,
                &mut server,
                &CelsiusToFahrenheitRequest { celsius },
            )
            .unwrap();
            assert!((response.fahrenheit - fahrenheit).abs() < 1e-9, "{celsius}");
        }
    }
}

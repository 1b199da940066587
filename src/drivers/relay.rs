//! Strike relay driver.
//!
//! One active-HIGH GPIO through a transistor to the relay coil. The
//! only operation is a blocking pulse: assert, hold, deassert. Used
//! exclusively on a successful unlock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

use crate::app::ports::ActuatorPort;

/// Implements [`ActuatorPort`] over a single output pin.
pub struct RelayDriver<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> RelayDriver<P, D> {
    /// Takes the pin already configured as output, deasserted.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }
}

impl<P: OutputPin, D: DelayNs> ActuatorPort for RelayDriver<P, D> {
    fn pulse(&mut self, duration_ms: u32) {
        info!("Relay pulse: {duration_ms}ms");
        let _ = self.pin.set_high();
        self.delay.delay_ms(duration_ms);
        let _ = self.pin.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Step {
        High,
        Delay(u32),
        Low,
    }

    #[derive(Clone)]
    struct Probe(Rc<RefCell<Vec<Step>>>);

    impl embedded_hal::digital::ErrorType for Probe {
        type Error = Infallible;
    }

    impl OutputPin for Probe {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Step::Low);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Step::High);
            Ok(())
        }
    }

    impl DelayNs for Probe {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Step::Delay(ns / 1_000_000));
        }
    }

    #[test]
    fn pulse_asserts_holds_deasserts() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let probe = Probe(Rc::clone(&log));
        let mut relay = RelayDriver::new(probe.clone(), probe);
        relay.pulse(2000);
        assert_eq!(
            *log.borrow(),
            vec![Step::High, Step::Delay(2000), Step::Low]
        );
    }
}

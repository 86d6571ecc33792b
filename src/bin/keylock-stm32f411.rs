//! Keypad lock on a STM32F411RET6
//!
//! Hold the activation button while resetting the board to start a session.
//! The board runs a single session, then halts until the next reset.

//! Wiring diagram
//!
//!  LCD1602 <-> STM32F411RET6
//!      Vss <-> GND
//!      Vdd <-> 5V
//!       V0 <-> potentiometer <-> 5V (to adjust the display contrast)
//!       RS <-> PA0
//!       RW <-> GND
//!       EN <-> PA2 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!  D0 - D7 <-> PB0 - PB7
//!
//!   Keypad <-> STM32F411RET6
//!  R1 - R4 <-> PC0 - PC3
//!  C1 - C3 <-> PC4 - PC6 (internal pull-up)
//!
//!  Buttons <-> STM32F411RET6 (other leg to GND, internal pull-up)
//! activate <-> PA8
//! selector <-> PA9
//!
//!  H-bridge <-> STM32F411RET6
//!       IN1 <-> PA5
//!       IN2 <-> PA6
//!        EN <-> PA7 (reserved, never driven)

#![no_std]
#![no_main]

use log::{error, info, LevelFilter};
use panic_rtt_target as _;
use rtt_target::rtt_init_log;
use stm32f4xx_hal::{pac, prelude::*};

use keylock::{
    button::Button,
    config::Config,
    keypad::Keypad,
    lcd::Lcd,
    lock::{halt, Lock, Parts},
    motor::Motor,
    sender::ParallelSender,
};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_log!(LevelFilter::Debug);

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.MHz()).freeze();

    let delayer = cp.SYST.delay(&clocks);

    let config = Config::default();

    let gpioa = dp.GPIOA.split();
    let gpiob = dp.GPIOB.split();
    let gpioc = dp.GPIOC.split();

    // LCD, 8 pin mode with RW tied low
    let sender = ParallelSender::new_8pin(
        gpioa.pa0.into_push_pull_output().erase(),
        gpioa.pa2.into_push_pull_output().erase(),
        gpiob.pb0.into_push_pull_output().erase(),
        gpiob.pb1.into_push_pull_output().erase(),
        gpiob.pb2.into_push_pull_output().erase(),
        gpiob.pb3.into_push_pull_output().erase(),
        gpiob.pb4.into_push_pull_output().erase(),
        gpiob.pb5.into_push_pull_output().erase(),
        gpiob.pb6.into_push_pull_output().erase(),
        gpiob.pb7.into_push_pull_output().erase(),
    );

    let keypad = Keypad::new(
        [
            gpioc.pc0.into_push_pull_output().erase(),
            gpioc.pc1.into_push_pull_output().erase(),
            gpioc.pc2.into_push_pull_output().erase(),
            gpioc.pc3.into_push_pull_output().erase(),
        ],
        [
            gpioc.pc4.into_pull_up_input().erase(),
            gpioc.pc5.into_pull_up_input().erase(),
            gpioc.pc6.into_pull_up_input().erase(),
        ],
    );

    let parts = Parts {
        lcd: Lcd::new(sender, config.get_delay_us()),
        keypad,
        activation: Button::new(gpioa.pa8.into_pull_up_input().erase()),
        selector: Button::new(gpioa.pa9.into_pull_up_input().erase()),
        motor: Motor::new(
            gpioa.pa5.into_push_pull_output().erase(),
            gpioa.pa6.into_push_pull_output().erase(),
            gpioa.pa7.into_push_pull_output().erase(),
        ),
    };

    let mut lock = Lock::new(parts, delayer, config);

    match lock.run() {
        Ok(outcome) => info!("session over: {:?}", outcome),
        Err(err) => error!("session aborted: {}", err),
    }

    halt()
}

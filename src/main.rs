//! FM Receiver Main Application
//!
//! Entry point for the STM32G474 + Si4703 FM receiver firmware.
//! Resets the tuner into 2-wire mode, powers it up, scans the band and
//! reports signal quality.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use si4703_firmware::hal::gpio::enter_two_wire_mode;
use si4703_firmware::hal::i2c::I2cBus;
use si4703_firmware::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FM Receiver Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let mut p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Initialize status LED (typically on PA5 for Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);
    spawner.spawn(heartbeat_task(led)).unwrap();

    // RST stays high for the life of the tuner once released
    let mut reset = Output::new(p.PB0, Level::High, Speed::Low);
    {
        // SDIO is a plain GPIO only until the bus mode has latched
        let mut sdio = Output::new(&mut p.PB9, Level::High, Speed::Low);
        if let Err(e) = enter_two_wire_mode::<embassy_stm32::i2c::Error, _, _, _>(
            &mut reset,
            &mut sdio,
            &mut Delay,
        ) {
            error!("Tuner reset failed: {}", e);
            loop {
                Timer::after_secs(60).await;
            }
        }
    }

    // PB8 = SCL, PB9 = SDA for I2C1 on STM32G474
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8, // SCL
        p.PB9, // SDA
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    info!("I2C1 initialized at {} Hz", I2C_FREQUENCY_HZ);

    let mut bus = I2cBus::new(i2c);
    for addr in bus.scan() {
        info!("I2C device at {}", addr);
    }
    let i2c = bus.release();

    let observer = |event: Event| match event {
        Event::InitStage(stage) => info!("Tuner {}", stage),
        Event::Poll { phase, attempt, status } if phase.is_seek() => {
            info!("Waiting for {} ({}): {}", phase, attempt, status);
        }
        Event::Poll { .. } => {}
    };

    let mut radio = match Si4703::init_observed(i2c, Delay, TunerConfig::default(), observer) {
        Ok(radio) => radio,
        Err(e) => {
            error!("Tuner init failed: {}", e);
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    match radio.device_info() {
        Ok(id) => info!("Tuner {}", id),
        Err(e) => warn!("Tuner ID read failed: {}", e),
    }

    let stations = match radio.scan_band::<SCAN_CAPACITY>() {
        Ok(stations) => stations,
        Err(e) => {
            warn!("Band scan failed: {}", e);
            heapless::Vec::new()
        }
    };
    info!("Found {} stations", stations.len());

    let target = stations
        .first()
        .map_or(DEFAULT_STATION_TENTHS_MHZ, |f| f.as_tenths_mhz());
    if let Err(e) = radio.set_channel(target) {
        error!("Tune failed: {}", e);
    }

    // Main loop - report what the tuner hears
    loop {
        match (radio.channel(), radio.status()) {
            (Ok(freq), Ok(status)) => info!(
                "{} {} {}",
                freq,
                status.rssi,
                if status.stereo { "stereo" } else { "mono" }
            ),
            (Err(e), _) | (_, Err(e)) => warn!("Status read failed: {}", e),
        }
        Timer::after_secs(10).await;
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after_millis(100).await;
        led.set_low();
        Timer::after_millis(900).await;
    }
}

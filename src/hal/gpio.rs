//! GPIO Abstractions
//!
//! Reset sequencing for the Si4703. The chip samples SDIO on the rising
//! edge of RST to pick its bus mode: SEN is pulled high on the breakout,
//! so SDIO low at that edge selects the 2-wire (I2C) interface. Once the
//! mode has latched the SDIO pin is handed over to the I2C peripheral.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, ErrorKind, OutputPin};

use crate::config::{MODE_LATCH_MS, RESET_HOLD_MS};
use crate::error::{Error, InitFault, InitStage};

/// Drive SDIO low and assert RST, then hold for [`RESET_HOLD_MS`].
pub fn hold_in_reset<RST, SDIO, D>(
    reset: &mut RST,
    sdio: &mut SDIO,
    delay: &mut D,
) -> Result<(), ErrorKind>
where
    RST: OutputPin,
    SDIO: OutputPin,
    D: DelayNs,
{
    sdio.set_low().map_err(|e| e.kind())?;
    reset.set_low().map_err(|e| e.kind())?;
    delay.delay_ms(RESET_HOLD_MS);
    Ok(())
}

/// Release RST and wait [`MODE_LATCH_MS`] for the bus mode to latch.
pub fn release_reset<RST, D>(reset: &mut RST, delay: &mut D) -> Result<(), ErrorKind>
where
    RST: OutputPin,
    D: DelayNs,
{
    reset.set_high().map_err(|e| e.kind())?;
    delay.delay_ms(MODE_LATCH_MS);
    Ok(())
}

/// Put the chip into 2-wire mode on borrowed pins.
///
/// Use this when the SDIO pin cannot be moved into the driver (for
/// example when the HAL builds the I2C peripheral from the raw pin after
/// the GPIO wrapper is dropped), then continue with
/// [`Si4703::init`](crate::drivers::si4703::Si4703::init). RST must stay
/// high for as long as the chip is in use.
///
/// # Errors
///
/// Returns [`Error::Init`] tagged with the stage whose pin write failed.
pub fn enter_two_wire_mode<E, RST, SDIO, D>(
    reset: &mut RST,
    sdio: &mut SDIO,
    delay: &mut D,
) -> Result<(), Error<E>>
where
    RST: OutputPin,
    SDIO: OutputPin,
    D: DelayNs,
{
    hold_in_reset(reset, sdio, delay).map_err(|kind| Error::Init {
        stage: InitStage::ResetAsserted,
        fault: InitFault::Pin(kind),
    })?;
    release_reset(reset, delay).map_err(|kind| Error::Init {
        stage: InitStage::ResetReleased,
        fault: InitFault::Pin(kind),
    })
}

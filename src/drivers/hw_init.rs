//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC1 channels and GPIO directions using raw ESP-IDF sys
//! calls, and exposes the small read/write helpers the sensor and buzzer
//! drivers sit on.  Called once from `main()` before the monitor loop.
//!
//! On the host every helper is a no-op or returns a fixed value; sensor
//! drivers inject simulated readings at their own layer.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("adc1"),
            HwInitError::GpioConfigFailed(_) => Self::Init("gpio"),
        }
    }
}

pub const ADC1_CH_GAS: u32 = 6;
pub const ADC1_CH_SOUND: u32 = 7;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the monitor loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_dht_line()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_GAS, ADC1_CH_SOUND] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH6=gas, CH7=sound)");
    Ok(())
}

/// Raw 12-bit ADC1 reading; 0 on driver error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        log::warn!("hw_init: ADC1 CH{} read failed (rc={})", channel, ret);
        return 0;
    }
    raw.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn config_pin(pin: i32, mode: gpio_mode_t, pull_up: bool) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: if pull_up {
            gpio_pullup_t_GPIO_PULLUP_ENABLE
        } else {
            gpio_pullup_t_GPIO_PULLUP_DISABLE
        },
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    unsafe {
        config_pin(pins::VIBRATION_GPIO, gpio_mode_t_GPIO_MODE_INPUT, false)?;
        // Flame module is open-collector, active-low.
        config_pin(pins::FLAME_GPIO, gpio_mode_t_GPIO_MODE_INPUT, true)?;
    }
    info!("hw_init: GPIO inputs configured (vibration, flame)");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    unsafe {
        config_pin(pins::BUZZER_GPIO, gpio_mode_t_GPIO_MODE_OUTPUT, false)?;
        gpio_set_level(pins::BUZZER_GPIO, 0);
    }
    info!("hw_init: GPIO outputs configured (buzzer)");
    Ok(())
}

/// DHT data line: open-drain so the MCU and the sensor can both pull low.
#[cfg(target_os = "espidf")]
unsafe fn init_dht_line() -> Result<(), HwInitError> {
    unsafe {
        config_pin(pins::DHT_GPIO, gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD, true)?;
        gpio_set_level(pins::DHT_GPIO, 1);
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: register read on an already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    false
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: register write on a pin configured in init_peripherals().
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Timing (bit-banged protocols) ─────────────────────────────

/// Microseconds since boot.
#[cfg(target_os = "espidf")]
pub fn now_us() -> i64 {
    // SAFETY: RTC counter read.
    unsafe { esp_timer_get_time() }
}

/// Busy-wait; only for sub-millisecond protocol timing.
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: ROM busy-wait, no shared state.
    unsafe { esp_rom_delay_us(us) }
}

// ── embedded-hal output pin ───────────────────────────────────

/// A push-pull output configured by [`init_peripherals`], exposed through
/// [`embedded_hal::digital::OutputPin`] so drivers stay hardware-agnostic.
#[derive(Debug, Clone, Copy)]
pub struct RawOutputPin {
    gpio: i32,
}

impl RawOutputPin {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl embedded_hal::digital::ErrorType for RawOutputPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for RawOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        gpio_write(self.gpio, true);
        Ok(())
    }
}

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use portable_atomic::{AtomicU32, Ordering};
use static_cell::StaticCell;
use usb_joystick::{
    configure_usb_hid, drive_led, BridgeError, JoystickBridge, JoystickDevice,
    JoystickRequestHandler, OutputError, PinSampler, SharedDevice, SharedJoystick, StatusLink,
    StatusTracker, UsbHidOutput, UsbStatusHandler, DEVICE_CONFIG, USB_MANUFACTURER, USB_PID,
    USB_PRODUCT, USB_SERIAL, USB_VID,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type Sampler = PinSampler<Input<'static>>;
type Bridge = JoystickBridge<SharedJoystick<Sampler>, UsbHidOutput<'static>>;

/// Joystick device shared by the tick task and the HID request handler.
static DEVICE: StaticCell<SharedDevice<Sampler>> = StaticCell::new();

/// Keep-alive period requested by the host through SET_IDLE.
static IDLE_MS: AtomicU32 = AtomicU32::new(DEVICE_CONFIG.default_idle_ms);

/// USB status, written by the device handler and the tick task.
static STATUS: StatusLink = StatusLink::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state and handlers.
static HID_STATE: StaticCell<State> = StaticCell::new();
static REQUEST_HANDLER: StaticCell<JoystickRequestHandler<Sampler>> = StaticCell::new();
static DEVICE_HANDLER: StaticCell<UsbStatusHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("USB joystick starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Inputs (active low, internal pull-ups) ---
    let joystick = [
        Input::new(p.PIN_2, Pull::Up), // up
        Input::new(p.PIN_3, Pull::Up), // down
        Input::new(p.PIN_4, Pull::Up), // left
        Input::new(p.PIN_5, Pull::Up), // right
    ];
    let buttons = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
    ];
    let sampler = PinSampler::new(joystick, buttons);

    // Debounce state exists before the host can ask for the first report.
    let device = DEVICE.init(Mutex::new(RefCell::new(JoystickDevice::new(
        sampler,
        &DEVICE_CONFIG,
    ))));
    let shared = SharedJoystick::new(device);
    info!(
        "debounce: {} ms ({} ticks)",
        DEVICE_CONFIG.debounce_ms(),
        DEVICE_CONFIG.window.ticks()
    );

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.serial_number = Some(USB_SERIAL);
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    builder.handler(DEVICE_HANDLER.init(UsbStatusHandler::new(
        &STATUS,
        &IDLE_MS,
        DEVICE_CONFIG.default_idle_ms,
    )));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let request_handler = REQUEST_HANDLER.init(JoystickRequestHandler::new(shared, &IDLE_MS));
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    // Build the USB device
    let usb_device = builder.build();

    let bridge = JoystickBridge::new(shared, UsbHidOutput::new(hid_writer), &DEVICE_CONFIG);

    // On-board LED on Pico
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(led_task(led).unwrap());
    spawner.spawn(joystick_task(bridge).unwrap());

    info!("USB joystick initialized, waiting for host...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// LED task - shows the USB status.
#[embassy_executor::task]
async fn led_task(led: Output<'static>) {
    drive_led(led, &STATUS).await
}

/// Joystick task - one debounce tick and at most one report per period.
#[embassy_executor::task]
async fn joystick_task(mut bridge: Bridge) {
    // Wait for USB to be ready
    bridge.output_mut().wait_ready().await;
    info!("USB HID ready, sending joystick reports...");

    let mut ticker = Ticker::every(Duration::from_millis(DEVICE_CONFIG.tick_period_ms));
    let mut configuration = 0;
    loop {
        ticker.next().await;

        // A new configuration starts a new host session: forget what the
        // previous host was sent and send the current state right away.
        let idle_ms = IDLE_MS.load(Ordering::Relaxed);
        let current = STATUS.configurations();
        if current != configuration {
            configuration = current;
            bridge.gate_mut().reset(idle_ms);
        } else {
            bridge.gate_mut().set_idle_ms(idle_ms);
        }

        match bridge.process_tick().await {
            Ok(_) => {}
            Err(BridgeError::Output(OutputError::NotReady)) => {
                warn!("HID endpoint disabled, waiting for host...");
                bridge.output_mut().wait_ready().await;
                ticker.reset();
            }
            Err(BridgeError::Output(e)) => {
                error!("Output error: {:?}", e);
                STATUS.update(StatusTracker::on_output_error);
            }
        }
    }
}

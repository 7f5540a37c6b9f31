// Fan-out Task - Konsumiert Trigger und published über beide Transporte
//
// Einziger Besitzer beider Publisher; HTTP- und Button-Task erreichen
// sie nur über den Request-Channel bzw. das Gate. Der select-Loop
// pollt den Request-Channel vor dem Gate, damit zustands-spezifische
// Button-Meldungen vor der generischen "Button pressed"-Meldung
// rausgehen.

use defmt::{error, info, warn};
use embassy_futures::select::{Either, select};
use esp_hal::Blocking;
use esp_hal::spi::master::Spi;

use publisher_core::{
    BUTTON_EVENT_MESSAGE, BrokerPublisher, Fanout, FanoutReport, Message, RadioPublisher,
};

use crate::hal::Sx127x;
use crate::tasks::broker::BrokerHandle;
use crate::{NotifyGate, PublishRequestReceiver};

type Radio = Sx127x<Spi<'static, Blocking>>;

/// Fan-out Task - läuft parallel zu anderen Tasks
///
/// Initialisiert das Funkmodul und bedient dann beide Trigger-Quellen:
/// - Publish-Requests von HTTP und Button (zustands-spezifische Texte)
/// - das Gate für die generische Button-Notification
#[embassy_executor::task]
pub async fn fanout_task(
    mut radio: Radio,
    broker: BrokerHandle,
    requests: PublishRequestReceiver,
    gate: &'static NotifyGate,
) {
    info!("Fanout: Task started");

    // Ein kaputtes Funkmodul hält den Rest nicht auf: Sends schlagen
    // dann einzeln fehl und werden pro Durchlauf gemeldet
    if let Err(e) = radio.init().await {
        error!("LoRa: Init failed: {}, transmissions will fail", e);
    }

    let mut fanout = Fanout::new(RadioPublisher::new(radio), BrokerPublisher::new(broker));

    loop {
        let report = match select(requests.receive(), gate.wait_and_consume()).await {
            Either::First(request) => {
                info!("Fanout: Dispatching '{}'", request.message.as_str());
                fanout.dispatch(&request).await
            }
            Either::Second(()) => {
                info!("Fanout: Button event, publishing '{}'", BUTTON_EVENT_MESSAGE);
                fanout.publish_all(&Message::new(BUTTON_EVENT_MESSAGE)).await
            }
        };

        log_report(&fanout, &report);
    }
}

fn log_report(
    fanout: &Fanout<RadioPublisher<Radio>, BrokerPublisher<BrokerHandle>>,
    report: &FanoutReport,
) {
    if let Err(e) = report.radio {
        warn!("Fanout: {} publish failed: {}", fanout.radio_name(), e);
    }
    if let Err(e) = report.broker {
        warn!("Fanout: {} publish failed: {}", fanout.broker_name(), e);
    }
    if report.all_ok() {
        info!("Fanout: Published to all transports");
    }
}

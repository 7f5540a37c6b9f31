// HTTP Server Task - Control Surface auf Port 80
//
// Roher TcpSocket statt eines HTTP-Frameworks: der Server bedient
// eine Verbindung zur Zeit, parst nur die Request-Line und antwortet
// immer mit "HTTP/1.1 200 OK" - auch für unbekannte Pfade (der Body
// sagt dann "404 Not Found").

use defmt::{Debug2Format, info, warn};
use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;
use embedded_io_async::Write;

use publisher_core::http::RESPONSE_HEADER;
use publisher_core::{Reply, Route};

use crate::PublishRequestSender;
use crate::config::{
    HTTP_BUFFER_SIZE, HTTP_PORT, HTTP_SOCKET_TIMEOUT_SECS, TCP_RX_BUFFER_SIZE, TCP_TX_BUFFER_SIZE,
};
use crate::hal::Indicator;
use crate::tasks::wifi::wait_for_network;
use crate::web::INDEX_HTML;

/// HTTP Server Task - läuft parallel zu anderen Tasks
///
/// Accept-Loop für die Control Surface:
/// - GET /            → Control-Page (HTML)
/// - GET /led/on|off  → LED schalten + Notification über alle Transporte
/// - GET /led/status  → "LED is ON" / "LED is OFF"
/// - GET /publish/... → gezielter Publish (all/lora/mqtt)
/// - alles andere     → "404 Not Found" (Body; Status bleibt 200)
///
/// # Kein Aushungern anderer Tasks
/// Die Control Surface darf Button-Polling und Fan-out nie blockieren.
/// Zwei Mechanismen sichern das ab: der Loop läuft als eigener
/// Embassy-Task (accept() suspendiert nur diesen Task, nicht den
/// Executor), und das Socket-Timeout (HTTP_SOCKET_TIMEOUT_SECS) löst
/// hängende Clients, damit auch dieser Task nie dauerhaft in
/// read()/write() festhängt.
#[embassy_executor::task]
pub async fn http_server_task(
    stack: &'static Stack<'static>,
    indicator: &'static Indicator,
    requests: PublishRequestSender,
) {
    info!("HTTP: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("HTTP: Listening on port {}", HTTP_PORT);

    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];
    let mut request_buf = [0u8; HTTP_BUFFER_SIZE];

    loop {
        let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
        // Hängende Clients geben den Server nach dem Timeout frei
        socket.set_timeout(Some(Duration::from_secs(HTTP_SOCKET_TIMEOUT_SECS)));

        if let Err(e) = socket.accept(HTTP_PORT).await {
            warn!("HTTP: Accept failed: {}", Debug2Format(&e));
            continue;
        }

        handle_connection(&mut socket, indicator, &requests, &mut request_buf).await;

        socket.close();
        // Restliche TX-Daten noch rausschieben bevor der Socket stirbt
        let _ = socket.flush().await;
    }
}

/// Bedient genau einen Request auf der offenen Verbindung
async fn handle_connection(
    socket: &mut TcpSocket<'_>,
    indicator: &'static Indicator,
    requests: &PublishRequestSender,
    request_buf: &mut [u8],
) {
    let len = match socket.read(request_buf).await {
        Ok(0) => {
            warn!("HTTP: Client closed before sending a request");
            return;
        }
        Ok(len) => len,
        Err(e) => {
            warn!("HTTP: Read failed: {}", Debug2Format(&e));
            return;
        }
    };

    // Nur die Request-Line interessiert; Malformed → NotFound
    let route = Route::from_request(&request_buf[..len]);
    info!("HTTP: {}", route);

    let (reply, publish) = indicator.apply(route);

    // Notification anstoßen bevor die Antwort rausgeht
    if let Some(request) = publish {
        requests.send(request).await;
    }

    let body = match reply {
        Reply::Page => INDEX_HTML,
        Reply::Text(text) => text,
    };

    if let Err(e) = write_response(socket, body).await {
        warn!("HTTP: Write failed: {}", Debug2Format(&e));
    }
}

/// Header (immer "200 OK") plus Body
async fn write_response(
    socket: &mut TcpSocket<'_>,
    body: &str,
) -> Result<(), embassy_net::tcp::Error> {
    socket.write_all(RESPONSE_HEADER.as_bytes()).await?;
    socket.write_all(body.as_bytes()).await?;
    socket.flush().await
}

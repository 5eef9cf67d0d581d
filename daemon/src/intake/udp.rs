use crate::utils::event::ServerEvents;
use log::{debug, info, warn};
use ragemon_protocol::event::{EventPacket, LifecycleEvent};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

const MAX_PACKET_BYTES: usize = 2048;

/// Binds the lifecycle intake and runs it until the stop notification.
pub fn spawn_event_intake(
    bind: SocketAddr,
    events: Arc<ServerEvents>,
    stop: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let socket = match UdpSocket::bind(bind).await {
            Ok(socket) => socket,
            Err(err) => {
                warn!("failed to bind lifecycle intake on {bind}: {err}");
                return;
            }
        };
        info!("lifecycle intake listening on {bind}");
        run_event_intake(socket, events, stop).await;
    })
}

/// Receives lifecycle packets pushed by the game server and fans them out
/// through the server event hooks. A malformed packet is logged and
/// dropped; the loop itself never dies.
pub async fn run_event_intake(socket: UdpSocket, events: Arc<ServerEvents>, stop: Arc<Notify>) {
    let mut buf = [0u8; MAX_PACKET_BYTES];
    let stopped = stop.notified();
    tokio::pin!(stopped);

    loop {
        tokio::select! {
            _ = &mut stopped => {
                debug!("lifecycle intake stopping");
                break;
            }
            received = socket.recv_from(&mut buf) => {
                let (len, peer) = match received {
                    Ok(pair) => pair,
                    Err(err) => {
                        warn!("lifecycle receive failed: {err}");
                        continue;
                    }
                };
                match serde_json::from_slice::<EventPacket>(&buf[..len]) {
                    Ok(packet) => dispatch(&events, packet),
                    Err(err) => {
                        debug!("dropping malformed lifecycle packet from {peer}: {err}");
                    }
                }
            }
        }
    }
}

fn dispatch(events: &ServerEvents, packet: EventPacket) {
    match packet.event {
        LifecycleEvent::PlayerJoin(data) => events.player_joined.invoke(&(data.id, data.name)),
        LifecycleEvent::PlayerQuit(data) => events.player_left.invoke(&(data.id, data.name)),
    }
}

#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub type Responder = Arc<dyn Fn(&Message) -> Message + Send + Sync>;

/// Upstream resolver stand-in. Answers every query with whatever the
/// responder builds from it, over UDP or TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start_udp(responder: Responder) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let Ok(query) = Message::from_vec(&buf[..len]) else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let response = responder(&query).to_vec().unwrap();
                        let _ = socket.send_to(&response, peer).await;
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub async fn start_tcp(responder: Responder) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let responder = responder.clone();
                        let counter = counter.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut body = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut body).await.is_err() {
                                return;
                            }
                            let Ok(query) = Message::from_vec(&body) else { return };
                            counter.fetch_add(1, Ordering::SeqCst);

                            let response = responder(&query).to_vec().unwrap();
                            let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                            let _ = stream.write_all(&response).await;
                        });
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// UDP socket that reads queries and never answers.
pub async fn silent_udp_server() -> (UdpSocket, SocketAddr) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    (socket, addr)
}

/// Echoes the question with one A record per question, owned by the
/// queried name.
pub fn answer_with_a(ip: Ipv4Addr, ttl: u32) -> Responder {
    Arc::new(move |query: &Message| {
        let mut response = reply_skeleton(query, ResponseCode::NoError);
        for q in query.queries() {
            response.add_answer(Record::from_rdata(q.name().clone(), ttl, RData::A(A(ip))));
        }
        response
    })
}

pub fn answer_with_code(code: ResponseCode) -> Responder {
    Arc::new(move |query: &Message| reply_skeleton(query, code))
}

/// Answers with an ID that does not match the query.
pub fn answer_with_wrong_id() -> Responder {
    Arc::new(|query: &Message| {
        let mut response = reply_skeleton(query, ResponseCode::NoError);
        response.set_id(query.id().wrapping_add(1));
        response
    })
}

pub fn reply_skeleton(query: &Message, code: ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .set_response_code(code);
    for q in query.queries() {
        response.add_query(q.clone());
    }
    response
}

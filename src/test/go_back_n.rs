use crate::channel::{ChannelOutcome, ScriptedOutcomes};
use crate::proto::{GbnAckOutcome, GbnReceiver, GbnRecvOutcome, GbnSender, Packet};
use crate::sim::SimTime;

fn sender(window: u64, total: u64) -> GbnSender {
    GbnSender::new(window, total, SimTime::from_secs(2))
}

fn clean() -> ScriptedOutcomes {
    ScriptedOutcomes::default()
}

fn fill(s: &mut GbnSender, now: SimTime) -> u64 {
    let mut sent = 0;
    while s.can_send() {
        s.send_next(now);
        sent += 1;
    }
    sent
}

#[test]
fn window_fill_respects_bounds() {
    let mut s = sender(4, 10);
    assert_eq!(fill(&mut s, SimTime::ZERO), 4);

    assert_eq!(s.base(), 0);
    assert_eq!(s.next_seq(), 4);
    assert_eq!(s.outstanding(), 4);
    assert!(!s.can_send());

    // Timer keys live exactly in [base, next_seq).
    for seq in 0..4 {
        let timer = s.timer(seq).expect("armed timer");
        assert_eq!(timer.tx_count, 1);
        assert_eq!(timer.armed_at, SimTime::ZERO);
    }
    assert!(s.timer(4).is_none());
}

#[test]
fn cumulative_ack_advances_base_and_discards_timers() {
    let mut s = sender(4, 10);
    fill(&mut s, SimTime::ZERO);

    let out = s.on_ack(2, &mut clean(), SimTime::ZERO);
    assert_eq!(out, GbnAckOutcome::Advanced { newly_acked: 3 });
    assert_eq!(s.base(), 3);
    assert_eq!(s.next_seq(), 4);
    assert_eq!(s.outstanding(), 1);
    assert!(s.timer(2).is_none());
    assert!(s.timer(3).is_some());
    // Window slid open again.
    assert!(s.can_send());
}

#[test]
fn stale_ack_is_idempotent() {
    let mut s = sender(4, 10);
    fill(&mut s, SimTime::ZERO);
    s.on_ack(2, &mut clean(), SimTime::ZERO);

    let armed_at = s.timer(3).expect("timer").armed_at;
    let out = s.on_ack(1, &mut clean(), SimTime::from_secs(1));
    assert_eq!(out, GbnAckOutcome::Stale);
    assert_eq!(s.base(), 3);
    assert_eq!(s.outstanding(), 1);
    assert_eq!(s.timer(3).expect("timer").armed_at, armed_at);
}

#[test]
fn corrupted_ack_retransmits_whole_window() {
    let mut s = sender(4, 10);
    fill(&mut s, SimTime::ZERO);

    let now = SimTime::from_secs(1);
    let mut ch = ScriptedOutcomes::new([ChannelOutcome::Corrupted]);
    let out = s.on_ack(0, &mut ch, now);
    assert_eq!(out, GbnAckOutcome::Corrupted { resent: 4 });

    assert_eq!(s.base(), 0);
    for seq in 0..4 {
        let timer = s.timer(seq).expect("timer");
        assert_eq!(timer.tx_count, 2);
        assert_eq!(timer.armed_at, now);
    }
}

#[test]
fn check_timeout_fires_at_most_once_per_call() {
    let mut s = sender(2, 10);
    fill(&mut s, SimTime::ZERO);

    // Not expired yet.
    assert_eq!(s.check_timeout(SimTime(1)), None);

    // Both timers expired, but a single check retransmits the window once.
    let resent = s.check_timeout(SimTime::from_secs(2));
    assert_eq!(resent, Some(2));
    for seq in 0..2 {
        let timer = s.timer(seq).expect("timer");
        assert_eq!(timer.tx_count, 2);
        assert_eq!(timer.armed_at, SimTime::from_secs(2));
    }

    // Timers were re-armed, so nothing fires immediately afterwards.
    assert_eq!(s.check_timeout(SimTime::from_secs(2)), None);
}

#[test]
fn retransmit_window_covers_in_flight_range_only() {
    let mut s = sender(4, 10);
    s.send_next(SimTime::ZERO);
    s.send_next(SimTime::ZERO);

    // Only two packets are in flight, so only two are resent.
    assert_eq!(s.retransmit_window(SimTime::from_secs(1)), 2);
    assert_eq!(s.outstanding(), 2);
}

#[test]
fn over_tx_limit_reports_first_offender() {
    let mut s = sender(2, 10);
    fill(&mut s, SimTime::ZERO);
    for _ in 0..3 {
        s.retransmit_window(SimTime::from_secs(1));
    }

    // Each in-flight packet has now been transmitted 4 times.
    assert_eq!(s.over_tx_limit(4), None);
    assert_eq!(s.over_tx_limit(3), Some((0, 4)));
}

#[test]
fn receiver_never_skips_ahead_or_delivers_twice() {
    let mut r = GbnReceiver::default();
    let mut ch = clean();

    // Ahead of expectation before anything was delivered: nothing to re-assert.
    let out = r.receive(&Packet::new(1, "Message 2"), &mut ch);
    assert_eq!(out, GbnRecvOutcome::OutOfOrder { ack: None });
    assert_eq!(r.delivered(), 0);

    // In-order packet delivers and advances.
    let out = r.receive(&Packet::new(0, "Message 1"), &mut ch);
    assert_eq!(out, GbnRecvOutcome::Delivered { ack: 0 });
    assert_eq!(r.expected_seq(), 1);

    // Duplicate of a delivered packet re-asserts the cumulative position.
    let out = r.receive(&Packet::new(0, "Message 1"), &mut ch);
    assert_eq!(out, GbnRecvOutcome::OutOfOrder { ack: Some(0) });
    assert_eq!(r.delivered(), 1);

    // Ahead of expectation: same re-assertion, no delivery.
    let out = r.receive(&Packet::new(2, "Message 3"), &mut ch);
    assert_eq!(out, GbnRecvOutcome::OutOfOrder { ack: Some(0) });
    assert_eq!(r.delivered(), 1);

    let out = r.receive(&Packet::new(1, "Message 2"), &mut ch);
    assert_eq!(out, GbnRecvOutcome::Delivered { ack: 1 });
    assert_eq!(r.delivered(), 2);
}

#[test]
fn dropped_packet_keeps_expectation() {
    let mut r = GbnReceiver::default();
    let mut ch = ScriptedOutcomes::new([ChannelOutcome::Lost, ChannelOutcome::Corrupted]);
    let pkt = Packet::new(0, "Message 1");

    assert_eq!(
        r.receive(&pkt, &mut ch),
        GbnRecvOutcome::Dropped {
            outcome: ChannelOutcome::Lost
        }
    );
    assert_eq!(
        r.receive(&pkt, &mut ch),
        GbnRecvOutcome::Dropped {
            outcome: ChannelOutcome::Corrupted
        }
    );
    assert_eq!(r.expected_seq(), 0);
}

#[test]
fn sender_prebuilds_session_payloads() {
    let s = sender(4, 3);
    assert_eq!(s.packet(0), &Packet::new(0, "Message 1"));
    assert_eq!(s.packet(2), &Packet::new(2, "Message 3"));
    assert_eq!(s.total_packets(), 3);
    assert_eq!(s.window_size(), 4);
}

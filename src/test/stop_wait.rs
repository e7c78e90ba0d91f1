use crate::channel::{ChannelOutcome, ScriptedOutcomes};
use crate::proto::{Packet, SwAckOutcome, SwReceiver, SwRecvOutcome, SwSender};

/// Helper: channel that never impairs anything.
fn clean() -> ScriptedOutcomes {
    ScriptedOutcomes::default()
}

#[test]
fn sender_seq_alternates_only_on_accepted_ack() {
    let mut sender = SwSender::default();
    let mut ch = clean();

    assert_eq!(sender.seq(), 0);
    assert_eq!(sender.on_ack(0, &mut ch), SwAckOutcome::Accepted);
    assert_eq!(sender.seq(), 1);
    assert_eq!(sender.on_ack(1, &mut ch), SwAckOutcome::Accepted);
    assert_eq!(sender.seq(), 0);
}

#[test]
fn corrupted_ack_leaves_seq_unchanged() {
    let mut sender = SwSender::default();
    let mut ch = ScriptedOutcomes::new([ChannelOutcome::Corrupted]);

    assert_eq!(sender.on_ack(0, &mut ch), SwAckOutcome::Corrupted);
    assert_eq!(sender.seq(), 0);
}

#[test]
fn mismatched_ack_leaves_seq_unchanged() {
    let mut sender = SwSender::default();
    let mut ch = clean();

    assert_eq!(sender.on_ack(1, &mut ch), SwAckOutcome::Mismatch);
    assert_eq!(sender.seq(), 0);
}

#[test]
fn lost_draw_on_ack_falls_through_to_seq_check() {
    // Only a Corrupted draw short-circuits acknowledgment handling.
    let mut sender = SwSender::default();
    let mut ch = ScriptedOutcomes::new([ChannelOutcome::Lost]);

    assert_eq!(sender.on_ack(0, &mut ch), SwAckOutcome::Accepted);
    assert_eq!(sender.seq(), 1);
}

#[test]
fn receiver_delivers_in_order_and_toggles_expectation() {
    let mut receiver = SwReceiver::default();
    let mut ch = clean();

    let out = receiver.receive(&Packet::new(0, "Message 1"), &mut ch);
    assert_eq!(out, SwRecvOutcome::Delivered { ack: 0 });
    assert_eq!(receiver.expected_seq(), 1);

    let out = receiver.receive(&Packet::new(1, "Message 2"), &mut ch);
    assert_eq!(out, SwRecvOutcome::Delivered { ack: 1 });
    assert_eq!(receiver.expected_seq(), 0);
}

#[test]
fn duplicate_packet_is_negatively_acknowledged() {
    let mut receiver = SwReceiver::default();
    let mut ch = clean();

    receiver.receive(&Packet::new(0, "Message 1"), &mut ch);
    // Same packet again: the receiver re-acks the side it already has.
    let out = receiver.receive(&Packet::new(0, "Message 1"), &mut ch);
    assert_eq!(out, SwRecvOutcome::OutOfOrder { ack: 0 });
    assert_eq!(receiver.expected_seq(), 1);
}

#[test]
fn lost_and_corrupted_packets_produce_no_ack() {
    let mut receiver = SwReceiver::default();
    let mut ch = ScriptedOutcomes::new([ChannelOutcome::Lost, ChannelOutcome::Corrupted]);
    let pkt = Packet::new(0, "Message 1");

    assert_eq!(
        receiver.receive(&pkt, &mut ch),
        SwRecvOutcome::Dropped {
            outcome: ChannelOutcome::Lost
        }
    );
    assert_eq!(
        receiver.receive(&pkt, &mut ch),
        SwRecvOutcome::Dropped {
            outcome: ChannelOutcome::Corrupted
        }
    );
    assert_eq!(receiver.expected_seq(), 0);
}

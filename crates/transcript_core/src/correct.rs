use crate::message::{ExtractedMessage, Sender};

const LENGTH_RATIO: usize = 2;
const LONG_MESSAGE_CHARS: usize = 500;

/// Repairs adjacent same-sender runs in a single forward pass.
///
/// Local and greedy: each decision inspects only the immediate predecessor,
/// may itself create a new collision at `i + 1`, and the pass is not re-run
/// to convergence. Returns the number of adjusted pairs so the caller can
/// log them.
pub fn repair_sender_sequence(messages: &mut [ExtractedMessage]) -> usize {
    let mut repaired = 0;
    for i in 1..messages.len() {
        if messages[i].sender != messages[i - 1].sender {
            continue;
        }

        let current = messages[i].content.chars().count();
        let previous = messages[i - 1].content.chars().count();

        if current > previous * LENGTH_RATIO && current > LONG_MESSAGE_CHARS {
            // A much longer follower reads like an answer.
            messages[i].sender = Sender::Assistant;
        } else if previous > current * LENGTH_RATIO && previous > LONG_MESSAGE_CHARS {
            messages[i - 1].sender = Sender::Assistant;
            messages[i].sender = Sender::User;
        } else {
            messages[i].sender = messages[i].sender.opposite();
        }
        repaired += 1;
    }
    repaired
}

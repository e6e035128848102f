// ============================================================
// Layer 3 — Dialogue Domain Types
// ============================================================
// A raw dialogue log is a tab-separated file, one message per row:
//
//   timestamp <TAB> speaker <TAB> [recipient <TAB>] message
//
// The recipient column is sometimes missing on the first row of
// a conversation. The width of that first row decides the layout
// for the opening speaker's turn only; from the first speaker
// change on, every row is read with the recipient column present.
//
// A conversation is turned into exchanges:
//
//   A: "hi"            ┐
//   A: "anyone here?"  ┘ turn 1 → encoder line "hi anyone here?"
//   B: "yes"           ┐
//   B: "what's up"     ┘ turn 2 → decoder line "yes what's up"
//   A: "thanks"          turn 3 → dropped (no reply follows)
//
// Turns alternate between the encoder and decoder side. The
// side that receives the next closed turn is tracked by the
// two-state WriteTarget machine.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::mem;

// ─── ColumnLayout ─────────────────────────────────────────────────────────────
/// Layout of the opening turn, resolved once from the width of the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// `timestamp, speaker, message`
    ThreeField,
    /// `timestamp, speaker, recipient, message`
    FourField,
}

impl ColumnLayout {
    /// Resolve the layout from the number of fields in a file's first row.
    /// Rows with fewer than three fields carry no message at all.
    pub fn detect(field_count: usize) -> Option<Self> {
        match field_count {
            0..=2 => None,
            3 => Some(Self::ThreeField),
            _ => Some(Self::FourField),
        }
    }

    /// Index of the message column under this layout.
    pub fn message_column(self) -> usize {
        match self {
            Self::ThreeField => 2,
            Self::FourField => 3,
        }
    }
}

// ─── DialogueRow ──────────────────────────────────────────────────────────────
/// One parsed message row, borrowing from the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueRow<'a> {
    pub speaker: &'a str,
    pub message: &'a str,
}

impl<'a> DialogueRow<'a> {
    /// Parse a raw line under `layout`.
    ///
    /// Returns `None` for malformed rows: fewer than three fields, or
    /// too narrow to hold the layout's message column. Callers treat
    /// that as the end of the conversation.
    pub fn parse(line: &'a str, layout: ColumnLayout) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return None;
        }

        Some(Self {
            speaker: fields[1],
            message: *fields.get(layout.message_column())?,
        })
    }
}

// ─── WriteTarget ──────────────────────────────────────────────────────────────
/// Which side of the dataset the turn being built belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    WritingToEncoder,
    WritingToDecoder,
}

impl WriteTarget {
    /// The other side. Triggered by every speaker change.
    pub fn switch(self) -> Self {
        match self {
            Self::WritingToEncoder => Self::WritingToDecoder,
            Self::WritingToDecoder => Self::WritingToEncoder,
        }
    }
}

// ─── Exchange ─────────────────────────────────────────────────────────────────
/// One training example: an encoder-side turn and the decoder-side
/// turn that answered it. Written to the same line number of the
/// encoder and decoder files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub prompt: String,
    pub reply: String,
}

// ─── Conversation ─────────────────────────────────────────────────────────────
/// Accumulates the rows of one dialogue file into turns and releases
/// them as complete exchanges.
///
/// An encoder turn is held back until its reply is closed; only
/// complete pairs ever leave this type.
#[derive(Debug)]
pub struct Conversation {
    speaker: String,
    turn: String,
    target: WriteTarget,
    pending_prompt: Option<String>,
    /// First-row layout; `None` once the opening speaker has been answered.
    opening_layout: Option<ColumnLayout>,
}

impl Conversation {
    /// Open a conversation with its first row, parsed under `layout`.
    /// The first speaker's turn always goes to the encoder side.
    pub fn start(first: DialogueRow<'_>, layout: ColumnLayout) -> Self {
        Self {
            speaker: first.speaker.to_string(),
            turn: first.message.to_string(),
            target: WriteTarget::WritingToEncoder,
            pending_prompt: None,
            opening_layout: Some(layout),
        }
    }

    /// Parse the next raw line of this conversation.
    ///
    /// Continuation rows of the opening turn use the first row's layout.
    /// The first reply and everything after it are read as `FourField`.
    /// `None` means the row is malformed and the conversation ends.
    pub fn parse_row<'l>(&self, line: &'l str) -> Option<DialogueRow<'l>> {
        let speaker = line.split('\t').nth(1)?;
        let layout = match self.opening_layout {
            Some(layout) if speaker == self.speaker => layout,
            _ => ColumnLayout::FourField,
        };
        DialogueRow::parse(line, layout)
    }

    /// Feed the next row. Returns an exchange when this row's speaker
    /// change closed a decoder-side turn.
    pub fn push(&mut self, row: DialogueRow<'_>) -> Option<Exchange> {
        // Same person sending several messages in a row: one turn
        if row.speaker == self.speaker {
            self.turn.push(' ');
            self.turn.push_str(row.message);
            return None;
        }

        // Speaker changed: the finished turn leaves, the new message
        // starts the next one on the other side
        let closed = mem::replace(&mut self.turn, row.message.to_string());
        self.speaker = row.speaker.to_string();
        self.opening_layout = None;

        let finished = self.close_turn(closed);
        self.target = self.target.switch();
        finished
    }

    /// End of input: close the open turn. A trailing encoder-side
    /// turn has no reply and is dropped.
    pub fn finish(mut self) -> Option<Exchange> {
        let last = mem::take(&mut self.turn);
        self.close_turn(last)
    }

    /// Side currently receiving messages.
    pub fn target(&self) -> WriteTarget {
        self.target
    }

    fn close_turn(&mut self, closed: String) -> Option<Exchange> {
        match self.target {
            // Held until the reply turn closes
            WriteTarget::WritingToEncoder => {
                self.pending_prompt = Some(closed);
                None
            }
            WriteTarget::WritingToDecoder => self
                .pending_prompt
                .take()
                .map(|prompt| Exchange { prompt, reply: closed }),
        }
    }
}

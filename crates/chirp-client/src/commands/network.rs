use super::{CommandInterpreter, CommandOutcome};

impl CommandInterpreter {
    /// `/who`
    pub(super) fn who(&self) -> CommandOutcome {
        match self.peers.connected_peer_count() {
            0 => self.system("No peers connected..."),
            n => self.system(format!("Connected peers: {n}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{fixture, system_text};

    #[tokio::test]
    async fn test_who_without_peers() {
        let f = fixture();
        let outcome = f.interpreter.execute("/who").await.unwrap();
        assert!(system_text(&outcome).starts_with("No peers connected"));
    }

    #[tokio::test]
    async fn test_who_counts_peers() {
        let f = fixture();
        f.peers.on_connected("Bob");
        f.peers.on_connected("Eve");

        let outcome = f.interpreter.execute("/who").await.unwrap();
        assert_eq!(system_text(&outcome), "Connected peers: 2");
    }
}

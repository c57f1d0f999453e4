use monitor_common::{ChainName, VaasByBlock};

/// Destination for the messages found in one scanned range.
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    async fn store(&self, chain: &ChainName, vaas: &VaasByBlock) -> anyhow::Result<()>;
}

/// Logs every message instead of persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait::async_trait]
impl MessageSink for LogSink {
    async fn store(&self, chain: &ChainName, vaas: &VaasByBlock) -> anyhow::Result<()> {
        for (block, messages) in vaas.iter() {
            for vaa in messages {
                tracing::info!(%chain, %block, %vaa, "Observed message");
            }
        }

        tracing::info!(
            %chain,
            blocks=%vaas.block_count(),
            messages=%vaas.vaa_count(),
            json=%serde_json::to_string(vaas)?,
            "Stored messages"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use monitor_common::{BlockHeight, BlockKey, VaaKey};

    use super::*;

    #[test_log::test(tokio::test)]
    async fn log_sink_accepts_everything() {
        let mut vaas = VaasByBlock::new();
        vaas.push(
            BlockKey::new(BlockHeight::new(101), 1_667_411_339_285_611_563),
            VaaKey::new("tx-a", ChainName::Near, "abc", 7),
        );

        LogSink.store(&ChainName::Near, &vaas).await.unwrap();
        LogSink
            .store(&ChainName::Near, &VaasByBlock::new())
            .await
            .unwrap();
    }
}

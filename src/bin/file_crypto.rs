// src/bin/file_crypto.rs
//! file_crypto: key pairs, file encryption and decryption from the terminal
//!
//!   file_crypto keygen  <dir> [A|RSA-4096]
//!   file_crypto encrypt <in> <out> <public_key.json>          (writes <out>.key.json)
//!   file_crypto decrypt <in> <out> <file_key.json> <private_key.json>
//!   file_crypto check   <dir>

use anyhow::{bail, Context, Result};
use envelope_file_crypto::aliases::Password;
use envelope_file_crypto::{
    load_config, Crypto, EncryptedFileKey, KeyPairVersion, PlainFileKeyVersion, UserKeyPair,
    UserPrivateKey, UserPublicKey,
};
use rpassword::read_password;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zeroize::Zeroizing;

const PUBLIC_KEY_FILE: &str = "public_key.json";
const PRIVATE_KEY_FILE: &str = "private_key.json";

const USAGE: &str = "usage:
  file_crypto keygen  <dir> [A|RSA-4096]
  file_crypto encrypt <in> <out> <public_key.json>
  file_crypto decrypt <in> <out> <file_key.json> <private_key.json>
  file_crypto check   <dir>";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let crypto = Crypto::new();

    match args.as_slice() {
        ["keygen", dir] => keygen(&crypto, Path::new(dir), load_config().crypto.key_pair_version),
        ["keygen", dir, version] => {
            let version: KeyPairVersion = version.parse()?;
            keygen(&crypto, Path::new(dir), version)
        }
        ["encrypt", input, output, public_key] => {
            encrypt(&crypto, Path::new(input), Path::new(output), Path::new(public_key))
        }
        ["decrypt", input, output, file_key, private_key] => decrypt(
            &crypto,
            Path::new(input),
            Path::new(output),
            Path::new(file_key),
            Path::new(private_key),
        ),
        ["check", dir] => check(&crypto, Path::new(dir)),
        _ => bail!("{USAGE}"),
    }
}

fn prompt(label: &str) -> Result<Password> {
    print!("{label}: ");
    std::io::stdout().flush()?;
    Ok(Password::new(read_password().context("Failed to read password")?))
}

fn read_json(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Feed `input` through `step` in config-sized chunks into `output`
fn pump<B: AsRef<[u8]>>(
    input: &Path,
    output: &Path,
    mut step: impl FnMut(&[u8]) -> envelope_file_crypto::Result<B>,
) -> Result<u64> {
    let chunk_size = load_config().stream.chunk_size;
    let mut reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );
    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?,
    );

    let mut buf = Zeroizing::new(vec![0u8; chunk_size]);
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(step(&buf[..n])?.as_ref())?;
        total += n as u64;
    }
    writer.flush()?;
    Ok(total)
}

fn keygen(crypto: &Crypto, dir: &Path, version: KeyPairVersion) -> Result<()> {
    let password = prompt("New private key password")?;
    let repeat = prompt("Repeat password")?;
    if password != repeat {
        bail!("Passwords do not match");
    }

    info!("Generating {version} key pair (this can take a while)");
    let pair = crypto.generate_user_key_pair(version, &password)?;

    fs::create_dir_all(dir)?;
    write_json(&dir.join(PUBLIC_KEY_FILE), &pair.public_key_container.to_json()?)?;
    write_json(&dir.join(PRIVATE_KEY_FILE), &pair.private_key_container.to_json()?)?;

    info!(
        "Key pair {} written to {}",
        pair.public_key_container.fingerprint(),
        dir.display()
    );
    Ok(())
}

fn encrypt(crypto: &Crypto, input: &Path, output: &Path, public_key: &Path) -> Result<()> {
    let public_key = UserPublicKey::from_json(&read_json(public_key)?)?;

    let file_key = crypto.generate_file_key(PlainFileKeyVersion::Aes256Gcm)?;
    let mut cipher = crypto.create_encryption_cipher(file_key)?;
    let bytes = pump(input, output, |chunk| cipher.process_block(chunk))?;
    let file_key = cipher.finalize()?;

    let wrapped = crypto.encrypt_file_key(&file_key, &public_key)?;
    let key_path = with_suffix(output, ".key.json");
    write_json(&key_path, &wrapped.to_json()?)?;

    info!(
        "ENCRYPTED {} bytes → {} (key: {})",
        bytes,
        output.display(),
        key_path.display()
    );
    Ok(())
}

fn decrypt(
    crypto: &Crypto,
    input: &Path,
    output: &Path,
    file_key: &Path,
    private_key: &Path,
) -> Result<()> {
    let wrapped = EncryptedFileKey::from_json(&read_json(file_key)?)?;
    let private_key = UserPrivateKey::from_json(&read_json(private_key)?)?;
    let password = prompt("Private key password")?;

    let file_key = crypto
        .decrypt_file_key(&wrapped, &private_key, &password)
        .context("Cannot unlock file key: wrong password or wrong private key?")?;

    // Plaintext stays in a side file until the tag verifies
    let partial = with_suffix(output, ".part");
    let mut cipher = crypto.create_decryption_cipher(&file_key)?;
    let verified = pump(input, &partial, |chunk| cipher.process_block(chunk))
        .and_then(|bytes| Ok(cipher.finalize().map(|()| bytes)?));

    let bytes = match verified {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("FAILED {}: {e}", input.display());
            fs::remove_file(&partial).ok();
            return Err(e);
        }
    };

    fs::rename(&partial, output)
        .with_context(|| format!("Failed to move result to {}", output.display()))?;
    info!("DECRYPTED {} bytes → {}", bytes, output.display());
    Ok(())
}

fn check(crypto: &Crypto, dir: &Path) -> Result<()> {
    let pair = UserKeyPair::new(
        UserPublicKey::from_json(&read_json(&dir.join(PUBLIC_KEY_FILE))?)?,
        UserPrivateKey::from_json(&read_json(&dir.join(PRIVATE_KEY_FILE))?)?,
    );
    let password = prompt("Private key password")?;

    if crypto.check_user_key_pair(&pair, &password) {
        info!("Key pair {} OK", pair.public_key_container.fingerprint());
        Ok(())
    } else {
        bail!("Key pair check failed: wrong password or mismatched halves")
    }
}

/// `<path><suffix>`, keeping any extension `path` already has
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_files_keep_the_full_output_name() {
        let out = Path::new("out/report.pdf");
        assert_eq!(with_suffix(out, ".part"), Path::new("out/report.pdf.part"));
        assert_eq!(with_suffix(out, ".key.json"), Path::new("out/report.pdf.key.json"));
        assert_eq!(with_suffix(Path::new("notes"), ".part"), Path::new("notes.part"));
    }
}

//! Fixtures: EXIF-bearing images built in memory and a one-route HTTP server.

#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF};
use std::io::Cursor;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A TIFF field value.
#[derive(Debug, Clone)]
pub enum Field {
    Ascii(&'static str),
    Byte(u8),
    Short(u16),
    Long(u32),
    Rational(Vec<(u32, u32)>),
}

impl Field {
    /// (type, count, little-endian payload)
    fn encode(&self) -> (u16, u32, Vec<u8>) {
        match self {
            Field::Ascii(s) => {
                let mut b = s.as_bytes().to_vec();
                b.push(0);
                (2, b.len() as u32, b)
            }
            Field::Byte(v) => (1, 1, vec![*v]),
            Field::Short(v) => (3, 1, v.to_le_bytes().to_vec()),
            Field::Long(v) => (4, 1, v.to_le_bytes().to_vec()),
            Field::Rational(parts) => {
                let mut b = Vec::with_capacity(parts.len() * 8);
                for (n, d) in parts {
                    b.extend_from_slice(&n.to_le_bytes());
                    b.extend_from_slice(&d.to_le_bytes());
                }
                (5, parts.len() as u32, b)
            }
        }
    }
}

/// Little-endian TIFF block with IFD0, optional Exif and GPS sub-IFDs, and an optional IFD1.
#[derive(Debug, Default, Clone)]
pub struct TiffBuilder {
    pub ifd0: Vec<(u16, Field)>,
    pub exif: Vec<(u16, Field)>,
    pub gps: Vec<(u16, Field)>,
    pub ifd1: Vec<(u16, Field)>,
}

const EXIF_POINTER: u16 = 0x8769;
const GPS_POINTER: u16 = 0x8825;

fn block_len(entries: &[(u16, Field)]) -> usize {
    let data: usize = entries
        .iter()
        .map(|(_, f)| {
            let len = f.encode().2.len();
            if len > 4 { len + len % 2 } else { 0 }
        })
        .sum();
    2 + 12 * entries.len() + 4 + data
}

fn write_ifd(out: &mut Vec<u8>, entries: &[(u16, Field)], next: u32) {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|(tag, _)| *tag);

    let start = out.len();
    let data_start = start + 2 + 12 * sorted.len() + 4;
    let mut data = Vec::new();

    out.extend_from_slice(&(sorted.len() as u16).to_le_bytes());
    for (tag, field) in &sorted {
        let (ty, count, bytes) = field.encode();
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&ty.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        if bytes.len() <= 4 {
            let mut inline = bytes.clone();
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&((data_start + data.len()) as u32).to_le_bytes());
            data.extend_from_slice(&bytes);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    out.extend_from_slice(&next.to_le_bytes());
    out.extend_from_slice(&data);
}

impl TiffBuilder {
    pub fn build(&self) -> Vec<u8> {
        let mut ifd0 = self.ifd0.clone();
        if !self.exif.is_empty() {
            ifd0.push((EXIF_POINTER, Field::Long(0)));
        }
        if !self.gps.is_empty() {
            ifd0.push((GPS_POINTER, Field::Long(0)));
        }

        let exif_off = 8 + block_len(&ifd0);
        let gps_off = exif_off + if self.exif.is_empty() { 0 } else { block_len(&self.exif) };
        let ifd1_off = gps_off + if self.gps.is_empty() { 0 } else { block_len(&self.gps) };

        for (tag, field) in ifd0.iter_mut() {
            match *tag {
                EXIF_POINTER => *field = Field::Long(exif_off as u32),
                GPS_POINTER => *field = Field::Long(gps_off as u32),
                _ => {}
            }
        }

        let mut out = b"II*\0".to_vec();
        out.extend_from_slice(&8u32.to_le_bytes());

        let next = if self.ifd1.is_empty() { 0 } else { ifd1_off as u32 };
        write_ifd(&mut out, &ifd0, next);
        if !self.exif.is_empty() {
            write_ifd(&mut out, &self.exif, 0);
        }
        if !self.gps.is_empty() {
            write_ifd(&mut out, &self.gps, 0);
        }
        if !self.ifd1.is_empty() {
            write_ifd(&mut out, &self.ifd1, 0);
        }
        out
    }
}

/// The fixture used throughout: a Canon EOS 80D shot at the Empire State Building.
pub fn canon_tiff() -> TiffBuilder {
    TiffBuilder {
        ifd0: vec![
            (0x010F, Field::Ascii("Canon")),
            (0x0110, Field::Ascii("EOS 80D")),
            (0x0112, Field::Short(1)),
            (0x0132, Field::Ascii("2021:06:01 12:30:00")),
        ],
        exif: vec![
            (0x829A, Field::Rational(vec![(1, 200)])),
            (0x829D, Field::Rational(vec![(28, 10)])),
            (0x8827, Field::Short(400)),
            (0x9003, Field::Ascii("2021:06:01 12:30:00")),
            (0x920A, Field::Rational(vec![(50, 1)])),
        ],
        gps: vec![
            (0x0001, Field::Ascii("N")),
            (0x0002, Field::Rational(vec![(40, 1), (44, 1), (5436, 100)])),
            (0x0003, Field::Ascii("W")),
            (0x0004, Field::Rational(vec![(73, 1), (59, 1), (840, 100)])),
            (0x0005, Field::Byte(0)),
            (0x0006, Field::Rational(vec![(4435, 10)])),
            (0x0012, Field::Ascii("WGS-84")),
        ],
        ifd1: Vec::new(),
    }
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 120, 40])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// An 8x8 JPEG carrying `tiff` in its APP1 segment.
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(encode(ImageFormat::Jpeg))).unwrap();
    jpeg.set_exif(Some(Bytes::copy_from_slice(tiff)));
    jpeg.encoder().bytes().to_vec()
}

/// An 8x8 JPEG straight from the encoder. No metadata.
pub fn jpeg_without_exif() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

/// SOI + APP1 Exif segment + EOI, nothing else.
pub fn tiny_jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// An 8x8 PNG, with an `eXIf` chunk when `tiff` is given.
pub fn png(tiff: Option<&[u8]>) -> Vec<u8> {
    let mut png = Png::from_bytes(Bytes::from(encode(ImageFormat::Png))).unwrap();
    png.set_exif(tiff.map(Bytes::copy_from_slice));
    png.encoder().bytes().to_vec()
}

/// An 8x8 lossless WebP, with an `EXIF` chunk when `tiff` is given.
pub fn webp(tiff: Option<&[u8]>) -> Vec<u8> {
    let mut webp = WebP::from_bytes(Bytes::from(encode(ImageFormat::WebP))).unwrap();
    webp.set_exif(tiff.map(Bytes::copy_from_slice));
    webp.encoder().bytes().to_vec()
}

/// A canned HTTP response.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            content_type,
            body,
        }
    }
}

/// Serve `response` to every connection on a loopback port. Returns the base URL.
pub async fn serve(response: Canned) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let response = response.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    response.status,
                    response.content_type,
                    response.body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&response.body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Accept connections and never answer.
pub async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
